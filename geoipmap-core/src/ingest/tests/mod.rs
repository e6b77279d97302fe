mod classifier_tests;

//-----------------------------------------------------------------------------
// Test helpers
//-----------------------------------------------------------------------------
const BROWSER_UA: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:40.0) Gecko/20100101 Firefox/40.0";

/// A combined-log line from a regular browser.
fn access_line(ip: &str, request: &str) -> String {
    format!(
        r#"{ip} - - [10/Oct/2015:13:55:36 -0700] "{request}" 200 2326 "http://example.com/" "{BROWSER_UA}""#
    )
}

/// A combined-log line with a custom user agent.
fn access_line_with_agent(ip: &str, request: &str, agent: &str) -> String {
    format!(r#"{ip} - - [10/Oct/2015:13:55:36 -0700] "{request}" 200 512 "-" "{agent}""#)
}
