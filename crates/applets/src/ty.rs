//! Relay a code snippet to a remote runner
//!
//! All command words are joined into one string. A literal `\n` becomes a
//! newline, and everything after `-stdin=` is sent as the program's input.

use crate::error::AppletResult;
use crate::fetch::Curl;

pub const DEFAULT_URL: &str = "https://based.lol/run.ty";
pub const USAGE: &str = "Usage: ty <code> [-stdin=<input>]";

const STDIN_MARKER: &str = "-stdin=";

#[derive(Debug, Clone)]
pub struct TyConfig {
    pub url: String,
}

impl Default for TyConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
        }
    }
}

/// Code and standard input for one remote run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub code: String,
    pub input: String,
}

impl RunRequest {
    /// Build a request from command words; `None` when there are none
    pub fn from_args(args: &[String]) -> Option<Self> {
        if args.is_empty() {
            return None;
        }

        let text = args.join(" ").replace("\\n", "\n");
        let mut pieces = text.split(STDIN_MARKER);
        let code = pieces.next().unwrap_or_default().to_string();
        let input = pieces.collect::<String>();

        Some(Self { code, input })
    }

    /// curl arguments for a multipart form POST of `code` and `input`.
    ///
    /// `--form-string` keeps a leading `@` or `<` from being read as a file.
    pub fn curl_args(&self, url: &str) -> Vec<String> {
        vec![
            "--silent".to_string(),
            "--show-error".to_string(),
            url.to_string(),
            "--form-string".to_string(),
            format!("code={}", self.code),
            "--form-string".to_string(),
            format!("input={}", self.input),
        ]
    }
}

/// POST the request and return the response body without trailing whitespace
pub fn run(request: &RunRequest, config: &TyConfig, curl: &Curl) -> AppletResult<String> {
    let body = curl.run(&request.curl_args(&config.url))?;
    Ok(body.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_no_words_is_usage() {
        assert_eq!(RunRequest::from_args(&[]), None);
    }

    #[test]
    fn test_code_without_input() {
        let request = RunRequest::from_args(&args(&["print(1", "+", "2)"])).unwrap();
        assert_eq!(request.code, "print(1 + 2)");
        assert_eq!(request.input, "");
    }

    #[test]
    fn test_stdin_marker_splits_input() {
        let request = RunRequest::from_args(&args(&["print(read())", "-stdin=hello", "world"])).unwrap();
        assert_eq!(request.code, "print(read()) ");
        assert_eq!(request.input, "hello world");
    }

    #[test]
    fn test_repeated_markers_concatenate_input() {
        let request = RunRequest::from_args(&args(&["x", "-stdin=a", "-stdin=b"])).unwrap();
        assert_eq!(request.code, "x ");
        assert_eq!(request.input, "a b");
    }

    #[test]
    fn test_escaped_newlines_are_expanded() {
        let request = RunRequest::from_args(&args(&["a\\nb"])).unwrap();
        assert_eq!(request.code, "a\nb");
    }

    #[test]
    fn test_curl_args_use_literal_form_strings() {
        let request = RunRequest {
            code: "@/etc/passwd".to_string(),
            input: "".to_string(),
        };
        let curl_args = request.curl_args("https://example.test/run");

        assert_eq!(curl_args[2], "https://example.test/run");
        assert_eq!(curl_args[3], "--form-string");
        assert_eq!(curl_args[4], "code=@/etc/passwd");
        assert_eq!(curl_args[6], "input=");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_trims_trailing_whitespace() {
        // echo prints its arguments, which is enough to see the trim
        let request = RunRequest::from_args(&args(&["x"])).unwrap();
        let config = TyConfig {
            url: "url".to_string(),
        };
        let out = run(&request, &config, &Curl::with_program("echo")).unwrap();
        assert_eq!(out, "--silent --show-error url --form-string code=x --form-string input=");
    }
}
