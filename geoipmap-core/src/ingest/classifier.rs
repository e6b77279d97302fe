/// User-agent fragments of crawlers, feed readers, monitors and HTTP
/// libraries. Matched as case-sensitive substrings of the whole line.
pub const AUTOMATED_TRAFFIC_SIGNATURES: &[&str] = &[
    "bot",
    "crawler",
    "spider",
    "bingbot",
    "Googlebot",
    "ysearch",
    "msnbot",
    "Google-HTTP",
    "metauri",
    "Photon",
    "jetmon",
    "FlipboardProxy",
    "gzip",
    "Twitterbot",
    "TweetmemeBot",
    "browserproxy",
    "WordPress/4.1",
    "http_request2",
    "crowsnest",
    "alexa",
    "firefly",
    "froogle",
    "ahrefsbot",
    "pingdom",
    "kraken",
    "openhose",
    "linkdex",
    "grokkit",
    "cloudflare-alwaysonline",
    "grouphigh",
    "mj12bot",
    "port-monitor",
    "rqst",
    "facebookexternalhit",
    "moreover",
    "biggerbetter",
    "inagist",
    "incutio",
    "blo.gs",
    "feedbin",
    "newspaper",
    "typhoeus",
    "recorded future",
    "linkfluence",
    "netseer",
    "package http",
    "httplib2",
];

/// Decides whether a raw line came from an automated client.
#[derive(Debug, Clone)]
pub struct TrafficClassifier {
    signatures: Vec<String>,
}

impl Default for TrafficClassifier {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl TrafficClassifier {
    /// Built-in signatures followed by `extra`.
    pub fn new(extra: &[String]) -> Self {
        let signatures = AUTOMATED_TRAFFIC_SIGNATURES
            .iter()
            .map(|s| s.to_string())
            .chain(extra.iter().cloned())
            .collect();

        Self { signatures }
    }

    pub fn is_automated_traffic(&self, line: &str) -> bool {
        self.matching_signature(line).is_some()
    }

    /// First signature (in list order) found in `line`.
    pub fn matching_signature(&self, line: &str) -> Option<&str> {
        self.signatures
            .iter()
            .map(String::as_str)
            .find(|signature| line.contains(signature))
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
