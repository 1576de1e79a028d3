fn main() {
    // The firmware bakes an optional JSON override in via `option_env!`.
    println!("cargo:rerun-if-env-changed=INTERSECTION_CONFIG");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
