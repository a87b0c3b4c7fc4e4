fn main() {
    println!("cargo::rustc-check-cfg=cfg(tracing_pretty)");
    println!("cargo::rerun-if-env-changed=RUST_LOG_PRETTY");

    // `RUST_LOG_PRETTY=1 cargo build` switches to multi-line log output.
    if std::env::var_os("RUST_LOG_PRETTY").is_some_and(|x| x == "1") {
        println!("cargo::rustc-cfg=tracing_pretty");
    }
}
