use std::{env, fs, path::PathBuf};

fn main() {
    let Ok(target) = env::var("TARGET") else {
        return;
    };

    // Pico 1 firmware links against memory.x; host builds need nothing.
    if target.starts_with("thumbv6m") {
        let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
        let memory_x = fs::read_to_string("memory-pico1.x").expect("Failed to read memory-pico1.x");
        fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
    }
    println!("cargo:rerun-if-changed=memory-pico1.x");
    println!("cargo:rerun-if-changed=build.rs");
}
