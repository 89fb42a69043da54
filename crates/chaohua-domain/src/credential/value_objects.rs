use once_cell::sync::Lazy;
use regex::Regex;

static XSRF_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"XSRF-TOKEN=([^;]+)").expect("valid XSRF-TOKEN pattern"));
static SUB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"SUB=([^;]+)").expect("valid SUB pattern"));

/// Shown when the credential carries no `SUB` field
pub const UNKNOWN_USER: &str = "未知用户";

/// Number of characters of the `SUB` value shown in the user hint
const USER_HINT_LEN: usize = 8;

/// A session cookie bundle (`k1=v1; k2=v2; ...`), cleaned for use as an HTTP header.
///
/// Cleaning is lossy: surrounding whitespace, line breaks, non-ASCII characters and
/// other control characters (except tab) are removed. The result is always a valid
/// header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    cookie: String,
    xsrf_token: Option<String>,
}

impl Credential {
    pub fn new(raw: &str) -> Self {
        let cookie = Self::sanitize(raw);
        let xsrf_token = XSRF_TOKEN_RE
            .captures(&cookie)
            .map(|caps| caps[1].to_string());

        Self { cookie, xsrf_token }
    }

    pub fn sanitize(raw: &str) -> String {
        raw.trim()
            .chars()
            .filter(|c| c.is_ascii() && (*c == '\t' || !c.is_ascii_control()))
            .collect::<String>()
            .trim()
            .to_string()
    }

    pub fn as_str(&self) -> &str {
        &self.cookie
    }

    pub fn is_empty(&self) -> bool {
        self.cookie.is_empty()
    }

    /// Anti-forgery token echoed back as the `X-XSRF-TOKEN` header
    pub fn xsrf_token(&self) -> Option<&str> {
        self.xsrf_token.as_deref()
    }

    /// Best-effort display hint built from the `SUB` field, e.g. `用户_2A25Kx1Y...`
    pub fn user_hint(&self) -> String {
        match SUB_RE.captures(&self.cookie) {
            Some(caps) => {
                let prefix: String = caps[1].chars().take(USER_HINT_LEN).collect();
                format!("用户{}...", prefix)
            }
            None => UNKNOWN_USER.to_string(),
        }
    }
}

/// Shorten a stored cookie for listing: first 20 and last 10 characters.
pub fn mask_cookie(cookie: &str) -> String {
    let chars: Vec<char> = cookie.chars().collect();
    if chars.len() <= 30 {
        return cookie.to_string();
    }

    let head: String = chars[..20].iter().collect();
    let tail: String = chars[chars.len() - 10..].iter().collect();
    format!("{}...{}", head, tail)
}
