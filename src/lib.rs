pub mod error;

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod facade {
    pub mod conversion_facade;
    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod models {
    pub mod backend;
    pub mod conversion;
}

pub mod service {
    pub mod backends;
    pub mod config_service;
    pub mod file;
    pub mod normalize;
    pub mod probe;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod utils {
    pub mod process;
    pub mod utils;
}
