use std::{env, fs, path::PathBuf};

fn main() {
    // 1) Handle memory.x for the Pico demo
    let target = env::var("TARGET").unwrap_or_default();
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    if target.starts_with("thumbv6m") {
        // Pico 1: copy our custom memory-pico1.x to OUT_DIR as memory.x
        let memory_x =
            fs::read_to_string("memory-pico1.x").expect("Failed to read memory-pico1.x");
        let dest = out_dir.join("memory.x");
        fs::write(&dest, memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed=memory-pico1.x");
    }

    // 2) Load optional env files (still supported for convenience)
    let _ = dotenvy::from_filename(".env");
    load_home_env(".nixie.env");

    // 3) Provide fallbacks so the clock compiles without .env
    let start_time = env_or_default("NIXIE_START_TIME", "12:00:00");
    let dots = env_or_default("NIXIE_DOTS", "blink");
    let slot_machine = env_or_default("NIXIE_SLOT_MACHINE", "hour");
    let led_effect = env_or_default("NIXIE_LED_EFFECT", "off");
    let led_brightness = env_or_default("NIXIE_LED_BRIGHTNESS", "50");

    // 4) Expose as compile-time constants, parsed by `ClockConfig::from_build_env` and
    //    `LedRingConfig::from_build_env`
    println!("cargo:rustc-env=NIXIE_START_TIME={start_time}");
    println!("cargo:rustc-env=NIXIE_DOTS={dots}");
    println!("cargo:rustc-env=NIXIE_SLOT_MACHINE={slot_machine}");
    println!("cargo:rustc-env=NIXIE_LED_EFFECT={led_effect}");
    println!("cargo:rustc-env=NIXIE_LED_BRIGHTNESS={led_brightness}");

    println!("cargo:rerun-if-env-changed=NIXIE_START_TIME");
    println!("cargo:rerun-if-env-changed=NIXIE_DOTS");
    println!("cargo:rerun-if-env-changed=NIXIE_SLOT_MACHINE");
    println!("cargo:rerun-if-env-changed=NIXIE_LED_EFFECT");
    println!("cargo:rerun-if-env-changed=NIXIE_LED_BRIGHTNESS");
    println!("cargo:rerun-if-changed=.env");
}

fn load_home_env(file: &str) {
    let home = match env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) {
        Some(path) => PathBuf::from(path),
        None => return,
    };
    let path = home.join(file);
    let _ = dotenvy::from_path(&path);
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
