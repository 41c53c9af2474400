// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

//! Connectivity probe boundary.
//!
//! The coordinator consumes a probe; it never owns connectivity detection.
//! A probe answers a single synchronous question with no side effects.

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

/// Reports whether the remote service is currently reachable.
pub trait ConnectivityProbe: Send + Sync {
    /// Single synchronous reachability query. No side effects.
    fn is_reachable(&self) -> bool;
}

/// Probe that attempts a TCP connection to the sync host.
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    /// Create a probe for the given host and port.
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        TcpProbe {
            host: host.into(),
            port,
            timeout,
        }
    }

    fn resolve(&self) -> Option<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .ok()?
            .next()
    }
}

impl ConnectivityProbe for TcpProbe {
    fn is_reachable(&self) -> bool {
        let Some(addr) = self.resolve() else {
            return false;
        };
        std::net::TcpStream::connect_timeout(&addr, self.timeout).is_ok()
    }
}
