use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development except
/// the JWT secret. Optional integrations (VNPay, SMTP, chatbot) load as
/// `None` when their key variables are unset; the routes that need them
/// fail fast with a clear error instead.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// VNPay gateway configuration; `None` disables payment routes.
    pub vnpay: Option<VnpayConfig>,
    /// SMTP configuration; `None` disables reset-link email delivery.
    pub smtp: Option<SmtpConfig>,
    /// Chatbot upstream configuration; `None` forces the database fallback.
    pub chatbot: Option<ChatbotConfig>,
    /// Directory uploaded media is written to and served from (default: `uploads`).
    pub upload_dir: String,
}

/// VNPay gateway settings.
#[derive(Debug, Clone)]
pub struct VnpayConfig {
    /// Merchant terminal code (`vnp_TmnCode`).
    pub tmn_code: String,
    /// Shared HMAC secret.
    pub secret: String,
    /// Hosted payment page base URL.
    pub pay_url: String,
    /// URL the gateway redirects the customer's browser back to.
    pub return_url: String,
}

impl VnpayConfig {
    /// Load VNPay configuration. Returns `None` when `VNPAY_TMN_CODE` is
    /// unset; panics if it is set but the secret is missing, since a half
    /// configured gateway is a deployment mistake.
    ///
    /// | Env Var            | Required | Default                                                    |
    /// |--------------------|----------|------------------------------------------------------------|
    /// | `VNPAY_TMN_CODE`   | yes      | --                                                         |
    /// | `VNPAY_SECRET`     | yes      | --                                                         |
    /// | `VNPAY_PAY_URL`    | no       | `https://sandbox.vnpayment.vn/paymentv2/vpcpay.html`       |
    /// | `VNPAY_RETURN_URL` | no       | `http://localhost:5173/payment/return`                     |
    pub fn from_env() -> Option<Self> {
        let tmn_code = std::env::var("VNPAY_TMN_CODE").ok()?;
        let secret = std::env::var("VNPAY_SECRET")
            .expect("VNPAY_SECRET must be set when VNPAY_TMN_CODE is set");
        Some(Self {
            tmn_code,
            secret,
            pay_url: std::env::var("VNPAY_PAY_URL").unwrap_or_else(|_| {
                "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html".into()
            }),
            return_url: std::env::var("VNPAY_RETURN_URL")
                .unwrap_or_else(|_| "http://localhost:5173/payment/return".into()),
        })
    }
}

/// SMTP settings for password-reset mail.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub from_address: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Base URL of the admin frontend, used to build the reset link.
    pub reset_link_base: String,
}

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

impl SmtpConfig {
    /// Load SMTP configuration. Returns `None` if `SMTP_HOST` is not set,
    /// signalling that email delivery is not configured and should be
    /// skipped (the reset link is logged instead).
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            host,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "noreply@vietsu.local".into()),
            username: std::env::var("SMTP_USER").ok(),
            password: std::env::var("SMTP_PASSWORD").ok(),
            reset_link_base: std::env::var("RESET_LINK_BASE")
                .unwrap_or_else(|_| "http://localhost:5173/admin/reset-password".into()),
        })
    }
}

/// Upstream AI settings for the chatbot route.
#[derive(Debug, Clone)]
pub struct ChatbotConfig {
    pub api_url: String,
    pub api_key: String,
}

impl ChatbotConfig {
    /// Load chatbot configuration. Returns `None` when `CHATBOT_API_KEY`
    /// is unset; the chatbot route then answers from the database only.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("CHATBOT_API_KEY").ok()?;
        Some(Self {
            api_url: std::env::var("CHATBOT_API_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent".into()
            }),
            api_key,
        })
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            vnpay: VnpayConfig::from_env(),
            smtp: SmtpConfig::from_env(),
            chatbot: ChatbotConfig::from_env(),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
        }
    }
}
