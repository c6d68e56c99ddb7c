//! C bindings for loading OpenEXR images
//!
//! The decoding itself is delegated to the `image` crate's EXR codec; this
//! crate only moves pixels and error text across the C ABI. Buffers handed
//! to the caller are allocated with `libc::malloc` and stay alive until the
//! caller releases them through `exl_free_buffer` / `exl_free_error_message`.
mod load;
mod utils;
