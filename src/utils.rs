use std::ffi::{c_char, c_float, c_void};

use libc::size_t;

/// Allocate a region of memory
///
/// This uses libc's malloc hence on most platforms it should be the system
/// allocator, buffers returned by the load functions come from here
///
/// \param size: Memory size
#[no_mangle]
pub unsafe extern "C" fn exl_malloc(size: size_t) -> *mut c_void {
    libc::malloc(size)
}

/// Free a memory region that was allocated by `exl_malloc`
///
/// \param ptr: A pointer allocated by `exl_malloc`
#[no_mangle]
pub unsafe extern "C" fn exl_free(ptr: *mut c_void) {
    libc::free(ptr)
}

/// \brief Release a pixel buffer returned through `out_rgba`
///
/// Must only be called on a pointer obtained from `exl_load` or
/// `exl_load_from_memory`, and only once per pointer. Null is a no-op
///
/// \param ptr: The buffer to release
#[no_mangle]
pub unsafe extern "C" fn exl_free_buffer(ptr: *mut c_float) {
    if !ptr.is_null() {
        libc::free(ptr.cast());
    }
}

/// \brief Release an error message returned through `err`
///
/// Error messages come from their own release entry point so the two
/// allocation families stay separately releasable. Must only be called once
/// per message. Null is a no-op
///
/// \param msg: The message to release
#[no_mangle]
pub unsafe extern "C" fn exl_free_error_message(msg: *mut c_char) {
    if !msg.is_null() {
        libc::free(msg.cast());
    }
}
