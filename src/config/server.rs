use once_cell::sync::Lazy;
use std::{env, net::IpAddr};

pub static HOST: Lazy<IpAddr> = Lazy::new(|| {
    env::var("HOST")
        .unwrap_or_else(|_| "0.0.0.0".into())
        .parse()
        .expect("HOST must be an IP address")
});

pub static PORT: Lazy<u16> = Lazy::new(|| {
    env::var("PORT")
        .unwrap_or_else(|_| "8000".into())
        .parse()
        .expect("PORT must be a valid port number")
});

pub fn validate() {
    // Trigger the lazy statics to force panics early
    let _ = *HOST;
    let _ = *PORT;
}
