// src/http.rs
//! Outbound HTTP with a fixed timeout, a default browser user-agent,
//! and round-robin proxy rotation. No retries, no rate limiting; a
//! non-2xx response is returned to the caller, not interpreted.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;

use crate::error::ScrapeError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Ensure a proxy entry carries a scheme prefix.
pub fn normalize_proxy(proxy: &str) -> String {
    if proxy.starts_with("http://") || proxy.starts_with("https://") || proxy.starts_with("socks5://")
    {
        proxy.to_string()
    } else {
        format!("http://{}", proxy)
    }
}

/// Round-robin position over a fixed number of slots. The index is
/// advanced atomically: one rotator is shared by every adapter in a
/// run, and concurrent advances must never skip or repeat under race.
pub struct ProxyRotator {
    len: usize,
    index: AtomicUsize,
}

impl ProxyRotator {
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            index: AtomicUsize::new(0),
        }
    }

    pub fn advance(&self) -> usize {
        self.index.fetch_add(1, Ordering::Relaxed) % self.len
    }
}

/// HTTP access layer shared by all adapters in a run. reqwest binds a
/// proxy at client construction, so rotation happens over one
/// pre-built client per proxy; with no proxies there is a single
/// direct client.
pub struct HttpClient {
    clients: Vec<Client>,
    rotator: ProxyRotator,
}

impl HttpClient {
    pub fn new(
        proxies: &[String],
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self, ScrapeError> {
        let user_agent = match user_agent {
            Some(ua) if !ua.is_empty() => ua,
            _ => DEFAULT_USER_AGENT,
        };

        let mut clients = Vec::new();
        if proxies.is_empty() {
            clients.push(Self::build_client(timeout, user_agent, None)?);
        } else {
            for proxy in proxies {
                let proxy = normalize_proxy(proxy);
                clients.push(Self::build_client(timeout, user_agent, Some(proxy.as_str()))?);
            }
        }

        let rotator = ProxyRotator::new(clients.len());
        Ok(Self { clients, rotator })
    }

    fn build_client(
        timeout: Duration,
        user_agent: &str,
        proxy: Option<&str>,
    ) -> Result<Client, ScrapeError> {
        let mut builder = Client::builder().timeout(timeout).user_agent(user_agent);
        if let Some(proxy) = proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        Ok(builder.build()?)
    }

    fn next_client(&self) -> &Client {
        let idx = self.rotator.advance();
        if self.clients.len() > 1 {
            debug!("rotating to proxy slot {}", idx);
        }
        &self.clients[idx]
    }

    pub async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Response, ScrapeError> {
        let mut request = self.next_client().get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        Ok(request.send().await?)
    }

    pub async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<Response, ScrapeError> {
        let mut request = self.next_client().post(url).body(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        Ok(request.send().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_normalize_proxy() {
        assert_eq!(normalize_proxy("1.2.3.4:8080"), "http://1.2.3.4:8080");
        assert_eq!(normalize_proxy("http://1.2.3.4:8080"), "http://1.2.3.4:8080");
        assert_eq!(
            normalize_proxy("https://proxy.example.com"),
            "https://proxy.example.com"
        );
        assert_eq!(
            normalize_proxy("socks5://1.2.3.4:1080"),
            "socks5://1.2.3.4:1080"
        );
    }

    #[test]
    fn test_rotator_cycles_in_order() {
        let rotator = ProxyRotator::new(3);
        let picks: Vec<usize> = (0..7).map(|_| rotator.advance()).collect();
        assert_eq!(picks, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_rotator_concurrent_advances_stay_balanced() {
        let rotator = Arc::new(ProxyRotator::new(3));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let rotator = Arc::clone(&rotator);
            handles.push(std::thread::spawn(move || {
                let mut counts = [0usize; 3];
                for _ in 0..300 {
                    counts[rotator.advance()] += 1;
                }
                counts
            }));
        }

        let mut totals = [0usize; 3];
        for handle in handles {
            let counts = handle.join().expect("rotation thread panicked");
            for (total, count) in totals.iter_mut().zip(counts) {
                *total += count;
            }
        }

        // 2400 atomic advances over 3 slots: every slot is hit exactly
        // 800 times regardless of interleaving.
        assert_eq!(totals, [800, 800, 800]);
    }

    #[test]
    fn test_rotator_single_slot() {
        let rotator = ProxyRotator::new(0);
        assert_eq!(rotator.advance(), 0);
        assert_eq!(rotator.advance(), 0);
    }
}
