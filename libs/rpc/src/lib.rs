// @generated
// This file wires up buf-generated protobuf code
// Note: The prost files already include!() the tonic files automatically

pub mod tasks {
    include!("gen/tasks.rs");
    // tasks.tonic.rs is auto-included by tasks.rs
}
