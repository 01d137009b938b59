pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod verify_receipt_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod verify_receipt {
            pub(crate) mod common;
            pub(crate) mod request_body_model;
            pub(crate) mod response_body_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod receipt_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod verification_request;
        pub mod verification_result;
    }
    pub mod repositories {
        pub mod receipt_repository;
    }
}

pub mod config;
pub mod constants;
pub mod errors;
pub mod util;

pub use config::{ConfigSource, ReceiptVerifierConfig};
pub use domain::entities::{
    verification_request::VerificationRequest, verification_result::VerificationResult,
};
pub use errors::ReceiptVerifierError;
pub use util::{verify_purchase, verify_purchase_json, DefaultReceiptVerifier, ReceiptVerifierUtil};
