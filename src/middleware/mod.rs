pub mod identity_sync;
