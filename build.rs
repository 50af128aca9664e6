use std::env;

fn main() {
    let target = env::var("TARGET").unwrap();
    if target.starts_with("xtensa-esp32") {
        println!("cargo:rustc-link-arg-bins=-Tlinkall.x");
    }

    // Credentials are baked in through env!()
    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASSWORD");
}
