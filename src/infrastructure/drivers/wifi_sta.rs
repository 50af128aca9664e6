use core::fmt;
use core::str::FromStr;

use embassy_executor::Spawner;
use embassy_net::{DhcpConfig, Stack, StackResources, StaticConfigV4};
use embassy_time::{Duration, Timer, with_timeout};
use esp_hal::{peripherals::WIFI, rng::Rng};
use esp_radio::wifi::Config as WifiConfig;
use heapless::String;
use static_cell::make_static;

use crate::{
    config::NETWORK,
    infrastructure::tasks::{network_runner_task, wifi_connection_task},
};

/// Maximum length of the hostname
const MAX_HOSTNAME_LEN: usize = 32;

const MAX_NETWORK_CONNECTIONS: usize = 6;

/// Network bring-up error.
#[derive(Debug)]
pub enum NetworkError {
    /// Radio driver or Wi-Fi controller could not be initialised
    RadioInit,
    /// Configured hostname is longer than DHCP allows
    Hostname,
    /// Connection or runner task could not be spawned
    TaskSpawn,
    /// No link or no DHCP lease before the deadline
    JoinTimeout,
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::RadioInit => write!(f, "radio initialisation failed"),
            NetworkError::Hostname => write!(f, "hostname too long"),
            NetworkError::TaskSpawn => write!(f, "unable to spawn network task"),
            NetworkError::JoinTimeout => write!(f, "timed out joining the network"),
        }
    }
}

/// Start the Wi-Fi STA (Station) mode
///
/// Spawns the connection and stack runner tasks, then waits until the link is
/// up and DHCP has assigned an address. Reconnection after a later drop is
/// handled by the connection task.
pub async fn start_wifi_sta(
    spawner: Spawner,
    wifi_device: WIFI<'static>,
) -> Result<(Stack<'static>, StaticConfigV4), NetworkError> {
    let radio = esp_radio::init().map_err(|_| NetworkError::RadioInit)?;
    let radio = &*make_static!(radio);
    let (controller, interfaces) = esp_radio::wifi::new(radio, wifi_device, WifiConfig::default())
        .map_err(|_| NetworkError::RadioInit)?;

    let mut dhcp_config = DhcpConfig::default();
    dhcp_config.hostname = Some(
        String::<MAX_HOSTNAME_LEN>::from_str(NETWORK.hostname)
            .map_err(|()| NetworkError::Hostname)?,
    );
    let net_config = embassy_net::Config::dhcpv4(dhcp_config);

    let network_resources = make_static!(StackResources::<MAX_NETWORK_CONNECTIONS>::new());
    let (stack, runner) =
        embassy_net::new(interfaces.sta, net_config, network_resources, network_seed());

    let connection = wifi_connection_task(controller).map_err(|_| NetworkError::TaskSpawn)?;
    spawner.spawn(connection);
    let runner = network_runner_task(runner).map_err(|_| NetworkError::TaskSpawn)?;
    spawner.spawn(runner);

    log::info!("network: joining, hostname {}", NETWORK.hostname);
    let deadline = Duration::from_millis(NETWORK.join_timeout_ms);
    let config = with_timeout(deadline, wait_for_connection(stack))
        .await
        .map_err(|_| NetworkError::JoinTimeout)?;

    Ok((stack, config))
}

fn network_seed() -> u64 {
    let rng = Rng::new();
    u64::from(rng.random()) << 32 | u64::from(rng.random())
}

/// Wait for full network connectivity (link + IP address)
async fn wait_for_connection(stack: Stack<'_>) -> StaticConfigV4 {
    while !stack.is_link_up() {
        Timer::after(Duration::from_millis(100)).await;
    }

    loop {
        if let Some(config) = stack.config_v4() {
            return config;
        }
        Timer::after(Duration::from_millis(100)).await;
    }
}
