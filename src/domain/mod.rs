//! Domain layer - financial profiles and the shared foundation types.

pub mod finance;
pub mod foundation;
