//! Minimal resolv.conf reader.
//!
//! Only the directives that feed the dispatcher are honoured: `nameserver`
//! lines (order preserved) and the `timeout:N` option. Everything else,
//! `search`, `domain`, `ndots` and friends, is ignored.

use std::net::Ipv6Addr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvConf {
    pub nameservers: Vec<String>,
    pub timeout: Option<u64>,
}

impl ResolvConf {
    pub fn parse(contents: &str) -> Self {
        let mut conf = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("nameserver") => {
                    if let Some(server) = fields.next() {
                        conf.nameservers.push(bracket_ipv6(server));
                    }
                }
                Some("options") => {
                    for option in fields {
                        if let Some(secs) = option.strip_prefix("timeout:") {
                            if let Ok(secs) = secs.parse::<u64>() {
                                conf.timeout = Some(secs.max(1));
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        conf
    }
}

// A bare IPv6 literal would be ambiguous once a port is appended.
fn bracket_ipv6(server: &str) -> String {
    if server.parse::<Ipv6Addr>().is_ok() {
        format!("[{}]", server)
    } else {
        server.to_string()
    }
}
