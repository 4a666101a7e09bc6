use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::Client as ReqwestClient;
use thiserror::Error;
use tracing::debug;
use url::{Host, Url};

use crate::error::{AppError, AppResult};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; MetascopeBot/0.1; single-page SEO metadata analyzer)";

pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL (including http:// or https://)";

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 10;

/// Which target hosts may be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPolicy {
    PublicOnly,
    AllowPrivate,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Network(reqwest::Error),

    #[error("could not resolve host: {0}")]
    Resolve(std::io::Error),

    #[error("URL resolves to a private or reserved address")]
    PrivateAddress,

    #[error("invalid redirect target: {0}")]
    BadRedirect(String),

    #[error("too many redirects (more than {MAX_REDIRECTS})")]
    TooManyRedirects,
}

/// Raw page as returned by the remote server.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status_code: u16,
    pub body: Vec<u8>,
}

/// Performs the single GET of an analysis. Holds no per-request state; the
/// underlying client pools connections and is cheap to clone.
///
/// Redirects are followed here rather than by reqwest so every hop can be
/// vetted against the [`HostPolicy`].
#[derive(Clone, Debug)]
pub struct PageFetcher {
    client: ReqwestClient,
    timeout: Duration,
}

impl PageFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(Policy::none())
            .build()?;
        Ok(PageFetcher { client, timeout })
    }

    /// GET `url`, following redirects. Timeouts, transport failures and
    /// non-2xx statuses are all errors; nothing is retried. The timeout
    /// covers the whole redirect chain.
    ///
    /// `url` itself is not vetted; callers check it up front so a private
    /// target can be rejected as bad input. Every redirect target is checked
    /// here under [`HostPolicy::PublicOnly`].
    pub async fn fetch(&self, url: &Url, policy: HostPolicy) -> Result<FetchedPage, FetchError> {
        tokio::time::timeout(self.timeout, self.follow(url, policy))
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))?
    }

    async fn follow(&self, url: &Url, policy: HostPolicy) -> Result<FetchedPage, FetchError> {
        let mut current = url.clone();

        for hop in 0..=MAX_REDIRECTS {
            if hop > 0 && policy == HostPolicy::PublicOnly {
                ensure_public_host(&current).await?;
            }

            let response = self
                .client
                .get(current.as_str())
                .send()
                .await
                .map_err(|e| self.classify(e))?;

            let status = response.status();
            if status.is_redirection() {
                current = redirect_target(&current, &response)?;
                debug!(to = %current, status = status.as_u16(), "Following redirect");
                continue;
            }
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = response.bytes().await.map_err(|e| self.classify(e))?;
            return Ok(FetchedPage {
                status_code: status.as_u16(),
                body: body.to_vec(),
            });
        }

        Err(FetchError::TooManyRedirects)
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Network(e)
        }
    }
}

/// Resolve a redirect's `Location` against the URL that produced it.
fn redirect_target(from: &Url, response: &reqwest::Response) -> Result<Url, FetchError> {
    let status = response.status().as_u16();
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(FetchError::Status(status))?;

    let target = from
        .join(location)
        .map_err(|_| FetchError::BadRedirect(location.to_string()))?;

    match target.scheme() {
        "http" | "https" if target.host_str().is_some() => Ok(target),
        _ => Err(FetchError::BadRedirect(location.to_string())),
    }
}

// ── URL validation ─────────────────────────────────────────────────────────

/// Parse and validate a user-supplied URL before any network access.
/// Requires an http(s) scheme and a host.
pub fn parse_target_url(input: &str) -> AppResult<Url> {
    let parsed = Url::parse(input.trim())
        .map_err(|_| AppError::Validation(INVALID_URL_MESSAGE.into()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => {
            return Err(AppError::Validation(
                "Only http/https URLs are supported".into(),
            ))
        }
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(AppError::Validation("URL has no host".into())),
    }
}

/// Returns `true` if `ip` is a private, loopback, link-local or otherwise
/// non-routable address. IPv4-mapped IPv6 addresses follow the IPv4 rules.
pub fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_private_v4(v4),
        IpAddr::V6(v6) => {
            if let Some(v4) = v6.to_ipv4_mapped() {
                return is_private_v4(v4);
            }
            v6.is_loopback()
                || v6.is_unspecified()
                || (v6.segments()[0] & 0xfe00 == 0xfc00)
                || (v6.segments()[0] & 0xffc0 == 0xfe80)
        }
    }
}

fn is_private_v4(v4: Ipv4Addr) -> bool {
    let o = v4.octets();
    matches!(
        o,
        [127, ..]
            | [10, ..]
            | [169, 254, ..]
            | [192, 168, ..]
            | [0, ..]
            | [255, 255, 255, 255]
    ) || (o[0] == 172 && (16..=31).contains(&o[1]))
        // Carrier-grade NAT, 100.64.0.0/10.
        || (o[0] == 100 && (64..=127).contains(&o[1]))
}

/// Resolve the URL's host and reject it if any address is private.
/// Literal IP hosts are checked without a lookup.
pub async fn ensure_public_host(url: &Url) -> Result<(), FetchError> {
    let domain = match url.host() {
        Some(Host::Ipv4(ip)) => return check_address(IpAddr::V4(ip)),
        Some(Host::Ipv6(ip)) => return check_address(IpAddr::V6(ip)),
        Some(Host::Domain(domain)) => domain,
        None => {
            return Err(FetchError::Resolve(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "URL has no host",
            )))
        }
    };
    let port = url.port_or_known_default().unwrap_or(80);

    let addrs = tokio::net::lookup_host((domain, port))
        .await
        .map_err(FetchError::Resolve)?;

    for addr in addrs {
        check_address(addr.ip())?;
    }
    Ok(())
}

fn check_address(ip: IpAddr) -> Result<(), FetchError> {
    if is_private_ip(ip) {
        Err(FetchError::PrivateAddress)
    } else {
        Ok(())
    }
}
