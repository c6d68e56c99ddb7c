use std::ffi::{c_char, c_float, c_int, c_uchar, CStr, CString};
use std::mem::size_of;
use std::ptr;

use image::ImageFormat;
use libc::size_t;

use crate::utils::exl_malloc;

/// Status returned when an operation succeeded
pub const EXL_OK: c_int = 0;
/// Status returned when a load failed, details are in the `err` parameter
pub const EXL_ERR: c_int = -1;

/// Copy an error description into a malloc'd NUL terminated string the
/// caller releases with `exl_free_error_message`.
///
/// A null `err` means the caller doesn't want the message, drop it.
fn write_error(err: *mut *mut c_char, message: String) {
    if err.is_null() {
        return;
    }
    let msg = CString::new(message).unwrap_or_default();
    let mem = unsafe { exl_malloc(msg.as_bytes_with_nul().len()) };
    if mem.is_null() {
        return;
    }
    unsafe {
        libc::strcpy(mem.cast(), msg.as_ptr());
        *err = mem.cast();
    }
}

fn decode_exr(contents: &[u8]) -> Result<(Vec<f32>, u32, u32), String> {
    let image = image::load_from_memory_with_format(contents, ImageFormat::OpenExr)
        .map_err(|e| e.to_string())?;

    let rgba = image.into_rgba32f();
    let (width, height) = rgba.dimensions();
    Ok((rgba.into_raw(), width, height))
}

/// Move decoded pixels into a malloc'd buffer and fill the out parameters
fn emit_pixels(
    pixels: Vec<f32>, w: u32, h: u32, out_rgba: *mut *mut c_float, width: *mut c_int,
    height: *mut c_int, err: *mut *mut c_char
) -> c_int {
    let size = pixels.len() * size_of::<c_float>();

    let output = unsafe { exl_malloc(size) };
    if output.is_null() {
        write_error(err, format!("malloc failed for a buffer of {} bytes", size));
        return EXL_ERR;
    }
    unsafe {
        ptr::copy_nonoverlapping(pixels.as_ptr(), output.cast::<c_float>(), pixels.len());
        *out_rgba = output.cast();
    }
    if !width.is_null() {
        unsafe { *width = w as c_int };
    }
    if !height.is_null() {
        unsafe { *height = h as c_int };
    }
    EXL_OK
}

/// \brief Load an EXR file and return its pixels as interleaved RGBA floats
///
/// The allocator used for the returned buffer is `libc::malloc`, release it
/// with `exl_free_buffer` exactly once
///
/// @param file: Path of the file to decode, MUST be null terminated
///
/// @param out_rgba: After a successful load, stores a pointer to the first
/// pixel, the length of the array is strictly `width * height * 4` floats.
/// Cannot be null
///
/// @param width: Image width, written on success, can be null
///
/// @param height: Image height, written on success, can be null
///
/// @param err: On failure, stores a null terminated message describing what
/// went wrong, release it with `exl_free_error_message`. Can be null, in
/// which case the message is discarded
///
/// \returns 0 on success, -1 on failure. On failure `out_rgba`, `width` and
/// `height` are left untouched
#[no_mangle]
pub unsafe extern "C" fn exl_load(
    file: *const c_char, out_rgba: *mut *mut c_float, width: *mut c_int, height: *mut c_int,
    err: *mut *mut c_char
) -> c_int {
    if file.is_null() || out_rgba.is_null() {
        write_error(err, "file and out_rgba cannot be null".to_string());
        return EXL_ERR;
    }
    // safety: the caller is supposed to uphold this
    let binding = CStr::from_ptr(file).to_string_lossy();
    let path = binding.as_ref();

    match std::fs::read(path) {
        Ok(contents) => exl_load_from_memory(
            contents.as_ptr(),
            contents.len(),
            out_rgba,
            width,
            height,
            err
        ),
        Err(e) => {
            write_error(err, format!("{}: {}", path, e));
            EXL_ERR
        }
    }
}

/// \brief Decode EXR bytes already in memory
///
/// Same contract as `exl_load`, only the input comes from a byte array
/// instead of a file
///
/// @param input: Array of EXR bytes
///
/// @param input_size: Size of `input`
///
/// @param out_rgba: After a successful load, stores a pointer to the first
/// pixel, the length of the array is strictly `width * height * 4` floats.
/// Cannot be null
///
/// @param width: Image width, written on success, can be null
///
/// @param height: Image height, written on success, can be null
///
/// @param err: On failure, stores a null terminated message, release it with
/// `exl_free_error_message`. Can be null
///
/// \returns 0 on success, -1 on failure
#[no_mangle]
pub unsafe extern "C" fn exl_load_from_memory(
    input: *const c_uchar, input_size: size_t, out_rgba: *mut *mut c_float, width: *mut c_int,
    height: *mut c_int, err: *mut *mut c_char
) -> c_int {
    if input.is_null() || out_rgba.is_null() {
        write_error(err, "input and out_rgba cannot be null".to_string());
        return EXL_ERR;
    }
    let contents = std::slice::from_raw_parts(input, input_size);

    match decode_exr(contents) {
        Ok((pixels, w, h)) => emit_pixels(pixels, w, h, out_rgba, width, height, err),
        Err(e) => {
            write_error(err, e);
            EXL_ERR
        }
    }
}
