#![no_main]

use figment::Figment;
use figment::providers::{Format, Serialized, Yaml};
use libfuzzer_sys::fuzz_target;
use rpn_calculator::{Service, ServiceConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Same layering as the server: defaults under `calculator`, then the file
        let figment = Figment::new()
            .merge(Serialized::defaults(ServiceConfig::default()).key("calculator"))
            .merge(Yaml::string(s));
        if let Ok(config) = figment.extract_inner::<ServiceConfig>("calculator") {
            let _ = Service::new(config).evaluate(&["3", "4", "+"]);
        }
    }
});
