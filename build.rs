//! Build script for laser-toy.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rustc-check-cfg=cfg(rust_analyzer)");

    // Pico 1: copy memory.x to OUT_DIR so cortex-m-rt's link.x can find it
    let target = env::var("TARGET").expect("cargo sets TARGET");
    if target.starts_with("thumbv6m") {
        let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
        let memory_x = fs::read_to_string("memory.x").expect("Failed to read memory.x");
        fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
    println!("cargo:rerun-if-changed=memory.x");
}
