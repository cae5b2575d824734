//! Per-client request rate limiting.
//!
//! Each peer IP gets a bucket of `requests` that refills evenly over
//! `window`. Requests over the limit get 429 before reaching a handler.
//! Clients whose address is unknown (no connection info) share one bucket.

use std::{
  net::{IpAddr, Ipv4Addr, SocketAddr},
  num::NonZeroU32,
  time::Duration,
};

use axum::{
  extract::{ConnectInfo, Request, State},
  middleware::Next,
  response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use medbuddy_core::store::RecordStore;
use thiserror::Error;

use crate::{AppState, error::Error};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimitError {
  #[error("rate limit must allow at least one request")]
  ZeroRequests,

  #[error("rate limit window is too short for {0} requests")]
  WindowTooShort(u32),
}

pub struct RateLimit {
  limiter: DefaultKeyedRateLimiter<IpAddr>,
}

impl RateLimit {
  /// Allow up to `requests` per `window` for each client address.
  pub fn new(requests: u32, window: Duration) -> Result<Self, LimitError> {
    let burst = NonZeroU32::new(requests).ok_or(LimitError::ZeroRequests)?;
    let quota = Quota::with_period(window / requests)
      .ok_or(LimitError::WindowTooShort(requests))?
      .allow_burst(burst);
    Ok(Self { limiter: RateLimiter::keyed(quota) })
  }

  /// Spend one request from `client`'s bucket. `false` means over the limit.
  pub fn check(&self, client: IpAddr) -> bool { self.limiter.check_key(&client).is_ok() }
}

fn client_ip(req: &Request) -> IpAddr {
  req
    .extensions()
    .get::<ConnectInfo<SocketAddr>>()
    .map(|ConnectInfo(addr)| addr.ip())
    .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Middleware rejecting requests from clients over their limit.
pub async fn enforce<S>(
  State(state): State<AppState<S>>,
  req: Request,
  next: Next,
) -> Response
where
  S: RecordStore + Clone + 'static,
{
  let client = client_ip(&req);
  if !state.limiter.check(client) {
    tracing::warn!(%client, "rate limit exceeded");
    return Error::RateLimited.into_response();
  }
  next.run(req).await
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ip(last: u8) -> IpAddr { IpAddr::V4(Ipv4Addr::new(10, 0, 0, last)) }

  #[test]
  fn allows_burst_then_refuses() {
    let limit = RateLimit::new(3, Duration::from_secs(900)).unwrap();
    assert!(limit.check(ip(1)));
    assert!(limit.check(ip(1)));
    assert!(limit.check(ip(1)));
    assert!(!limit.check(ip(1)));
  }

  #[test]
  fn clients_have_separate_buckets() {
    let limit = RateLimit::new(1, Duration::from_secs(900)).unwrap();
    assert!(limit.check(ip(1)));
    assert!(!limit.check(ip(1)));
    assert!(limit.check(ip(2)));
  }

  #[test]
  fn zero_requests_is_rejected() {
    assert_eq!(
      RateLimit::new(0, Duration::from_secs(60)).err(),
      Some(LimitError::ZeroRequests)
    );
  }

  #[test]
  fn zero_window_is_rejected() {
    assert_eq!(
      RateLimit::new(5, Duration::ZERO).err(),
      Some(LimitError::WindowTooShort(5))
    );
  }
}
