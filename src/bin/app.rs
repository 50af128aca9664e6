//! Blink Firmware
//!
//! Joins the configured Wi-Fi network and serves a small control page:
//! - `/`, `/styles.css`, `/script.js` from the embedded web assets
//! - `/StartBlinking` and `/StopBlinking` to toggle the LED blink task

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::Duration;
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};
use esp_println::println;
use myrtio_blink_core::{LifecycleController, SharedPin, StaticAssetStore};
use myrtio_esp_blink::{
    config,
    controllers::init_http_controller,
    infrastructure::{
        drivers::{LedPin, start_wifi_sta},
        services::{SerialRequestLog, log_asset_inventory, web_asset_store},
        tasks::{EmbassyBlinkRuntime, HTTP_SERVER_TASKS, http_server_task},
        types::{BlinkController, BlinkPin},
    },
    led_gpio,
    mk_static,
};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    println!("=================================");
    println!("  MyrtIO Blink Firmware");
    println!("=================================");

    // Initialize hardware
    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    // Allocate heap memory (64 + 32 KB), the radio driver needs it
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start RTOS
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let assets = mk_static!(StaticAssetStore, web_asset_store());
    log_asset_inventory(assets);

    // LED starts low and idle; blinking only on request
    let pin = mk_static!(BlinkPin, SharedPin::new(LedPin::new(led_gpio!(peripherals))));
    let runtime = EmbassyBlinkRuntime::new(spawner.make_send());
    let blinker = mk_static!(
        BlinkController,
        LifecycleController::new(pin, runtime, config::BLINK)
    );
    let request_log = mk_static!(SerialRequestLog, SerialRequestLog);
    let handler = init_http_controller(assets, blinker, request_log);

    let (stack, ip_config) = match start_wifi_sta(spawner, peripherals.WIFI).await {
        Ok(network) => network,
        Err(e) => panic!("network: {}", e),
    };
    println!("Connected to WiFi. IP address: {}", ip_config.address.address());

    for _ in 0..HTTP_SERVER_TASKS {
        match http_server_task(stack, handler) {
            Ok(token) => spawner.spawn(token),
            Err(e) => panic!("http: unable to spawn server task: {:?}", e),
        }
    }
    println!("HTTP server started on port {}", config::HTTP.port);

    loop {
        embassy_time::Timer::after(Duration::from_secs(5)).await;
    }
}
