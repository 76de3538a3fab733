fn main() {
    // Propagate the ESP-IDF sysenv only for device builds; host-side
    // test builds (no `espidf` feature) need no cargo directives.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
