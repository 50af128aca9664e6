use myrtio_blink_core::BlinkConfig;

pub struct WifiConfig {
    pub ssid: &'static str,
    pub password: &'static str,
}

pub struct NetworkConfig {
    /// Hostname announced over DHCP
    pub hostname: &'static str,
    /// Deadline for link up and DHCP lease at startup
    pub join_timeout_ms: u64,
}

pub struct HttpConfig {
    pub port: u16,
}

pub const WIFI: WifiConfig = WifiConfig {
    ssid: env!("WIFI_SSID"),
    password: env!("WIFI_PASSWORD"),
};

pub const NETWORK: NetworkConfig = NetworkConfig {
    hostname: "myrtio-blink",
    join_timeout_ms: 30_000,
};

pub const HTTP: HttpConfig = HttpConfig { port: 80 };

pub const BLINK: BlinkConfig = BlinkConfig::new(500);

#[macro_export]
macro_rules! led_gpio {
    ($p:expr) => {
        $p.GPIO2
    };
}
