//! Browser fingerprints presented by the HTTP fetcher.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS,
};

use crate::config::{Browser, ClientProfile, Platform};

impl ClientProfile {
    /// User-Agent string matching the browser, platform and form factor.
    pub fn user_agent(&self) -> &'static str {
        match (self.browser, self.mobile, self.platform) {
            (Browser::Chrome, true, _) => {
                "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Mobile Safari/537.36"
            }
            (Browser::Chrome, false, Platform::Windows) => {
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
            }
            (Browser::Chrome, false, Platform::Macos) => {
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
            }
            (Browser::Chrome, false, Platform::Linux) => {
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
            }
            (Browser::Firefox, true, _) => {
                "Mozilla/5.0 (Android 14; Mobile; rv:125.0) Gecko/125.0 Firefox/125.0"
            }
            (Browser::Firefox, false, Platform::Windows) => {
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0"
            }
            (Browser::Firefox, false, Platform::Macos) => {
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:125.0) Gecko/20100101 Firefox/125.0"
            }
            (Browser::Firefox, false, Platform::Linux) => {
                "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0"
            }
        }
    }

    /// Navigation headers a real browser sends with a top-level page load.
    ///
    /// Chromium additionally sends client hints (`sec-ch-ua*`); Firefox does not.
    /// Accept-Encoding is left to the HTTP client so it matches what it can decode.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(match self.browser {
                Browser::Chrome => "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
                Browser::Firefox => "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            }),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
        headers.insert(
            HeaderName::from_static("sec-fetch-dest"),
            HeaderValue::from_static("document"),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-mode"),
            HeaderValue::from_static("navigate"),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-site"),
            HeaderValue::from_static("none"),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-user"),
            HeaderValue::from_static("?1"),
        );

        if self.browser == Browser::Chrome {
            headers.insert(
                HeaderName::from_static("sec-ch-ua"),
                HeaderValue::from_static(
                    "\"Chromium\";v=\"124\", \"Google Chrome\";v=\"124\", \"Not-A.Brand\";v=\"99\"",
                ),
            );
            headers.insert(
                HeaderName::from_static("sec-ch-ua-mobile"),
                HeaderValue::from_static(if self.mobile { "?1" } else { "?0" }),
            );
            headers.insert(
                HeaderName::from_static("sec-ch-ua-platform"),
                HeaderValue::from_static(self.platform_hint()),
            );
        }

        headers
    }

    fn platform_hint(&self) -> &'static str {
        if self.mobile {
            return "\"Android\"";
        }
        match self.platform {
            Platform::Windows => "\"Windows\"",
            Platform::Macos => "\"macOS\"",
            Platform::Linux => "\"Linux\"",
        }
    }
}
