//! C-ABI wrapper around `loklak-core`.
//!
//! # Overview
//! Exposes the Loklak endpoint catalog through `extern "C"` functions so a C
//! host can build requests, run them with its own HTTP stack, and hand the
//! responses back for decoding and pretty-printing.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Endpoints are selected by name (`"search"`, `"user"`, ...) rather than
//!   by a C enum, so an unknown value is a null return instead of an
//!   invalid discriminant.
//! - Options are an opaque handle filled field by field with
//!   `loklak_options_set`.
//! - The caller owns all returned pointers and must release them with the
//!   matching `loklak_*_free` / `loklak_free_*` function.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use loklak_core::{Endpoint, Field, HttpResponse, LoklakClient, QueryOptions, ServerConfig};

use types::*;

/// Borrow a caller-supplied C string as UTF-8. Null or invalid input yields `None`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn borrow_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Borrow an optional value string. Null reads as `Some("")`; a non-null
/// string that is not UTF-8 yields `None`.
///
/// # Safety
/// Same contract as `borrow_str`.
unsafe fn borrow_value<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return Some("");
    }
    unsafe { borrow_str(ptr) }
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url`, with settings/account resolved
/// against the default local admin base `http://localhost:9000/`.
///
/// Returns null if `base_url` is null, not UTF-8, or not an http(s) URL.
/// The caller must free the returned pointer with `loklak_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn loklak_client_new(base_url: *const c_char) -> *mut FfiLoklakClient {
    catch_unwind(|| {
        let Some(url) = (unsafe { borrow_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        match LoklakClient::from_base_url(url) {
            Ok(client) => Box::into_raw(Box::new(FfiLoklakClient { inner: client })),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Like `loklak_client_new`, but with an explicit local admin base.
#[unsafe(no_mangle)]
pub extern "C" fn loklak_client_new_with_local(
    base_url: *const c_char,
    local_base_url: *const c_char,
) -> *mut FfiLoklakClient {
    catch_unwind(|| {
        let (Some(url), Some(local)) =
            (unsafe { borrow_str(base_url) }, unsafe { borrow_str(local_base_url) })
        else {
            return std::ptr::null_mut();
        };
        match ServerConfig::with_local_base(url, local) {
            Ok(config) => Box::into_raw(Box::new(FfiLoklakClient {
                inner: LoklakClient::new(config),
            })),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `loklak_client_new*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn loklak_client_free(client: *mut FfiLoklakClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Allocate an empty options handle. Free it with `loklak_options_free`.
#[unsafe(no_mangle)]
pub extern "C" fn loklak_options_new() -> *mut FfiQueryOptions {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiQueryOptions {
            inner: QueryOptions::default(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Set one field by its snake_case name (`"query"`, `"from_user"`,
/// `"screen_name"`, `"order_by"`, ...). A null or empty `value` clears it.
///
/// Returns false, leaving the field untouched, if `options` or `field` is
/// null, `field` is unknown, or `value` is not valid UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn loklak_options_set(
    options: *mut FfiQueryOptions,
    field: *const c_char,
    value: *const c_char,
) -> bool {
    catch_unwind(|| {
        if options.is_null() {
            return false;
        }
        let Some(field) = (unsafe { borrow_str(field) }).and_then(Field::from_name) else {
            return false;
        };
        let Some(value) = (unsafe { borrow_value(value) }) else {
            return false;
        };
        let options = unsafe { &mut *options };
        options.inner.set(field, value);
        true
    })
    .unwrap_or(false)
}

/// Free an options handle. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn loklak_options_free(options: *mut FfiQueryOptions) {
    if !options.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(options) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the GET request for the endpoint named `endpoint`.
///
/// `options` may be null, which sends no parameters. Returns null if
/// `client` or `endpoint` is null or `endpoint` names no known route.
/// The caller must free the returned pointer with `loklak_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn loklak_build_request(
    client: *const FfiLoklakClient,
    endpoint: *const c_char,
    options: *const FfiQueryOptions,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(endpoint) = (unsafe { borrow_str(endpoint) }).and_then(|s| s.parse::<Endpoint>().ok())
        else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        let default_options = QueryOptions::default();
        let options = if options.is_null() {
            &default_options
        } else {
            unsafe { &(*options).inner }
        };
        match client.inner.build_request(endpoint, options) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a form POST to `api/<call>`.
///
/// `fields` points to `fields_len` key/value pairs and may be null when
/// `fields_len` is 0. A null value is sent as an empty string. Returns null
/// if `client` or `call` is null, if any field key is null, if any key or
/// value is not valid UTF-8, or if `call` is not a plain relative name.
#[unsafe(no_mangle)]
pub extern "C" fn loklak_build_call(
    client: *const FfiLoklakClient,
    call: *const c_char,
    fields: *const FfiFormField,
    fields_len: u32,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || (fields.is_null() && fields_len > 0) {
            return std::ptr::null_mut();
        }
        let Some(call) = (unsafe { borrow_str(call) }) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        let fields: &[FfiFormField] = if fields_len == 0 {
            &[]
        } else {
            unsafe { std::slice::from_raw_parts(fields, fields_len as usize) }
        };

        let mut form = Vec::with_capacity(fields.len());
        for field in fields {
            let Some(key) = (unsafe { borrow_str(field.key) }) else {
                return std::ptr::null_mut();
            };
            let Some(value) = (unsafe { borrow_value(field.value) }) else {
                return std::ptr::null_mut();
            };
            form.push((key, value));
        }

        match client.inner.build_call(call, &form) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() || resp.body_len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(resp.body, resp.body_len) }.to_vec()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Decode a response body and pretty-print it.
///
/// Returns a result with `error_code = Ok` and `json` set on success. The
/// status code is reported back but never turns into an error by itself.
#[unsafe(no_mangle)]
pub extern "C" fn loklak_parse_response(
    client: *const FfiLoklakClient,
    response: *const FfiHttpResponse,
) -> *mut FfiLoklakResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiLoklakResult::null_arg("client");
        }
        if response.is_null() {
            return FfiLoklakResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let status = resp.status;
        match client
            .inner
            .parse_response(ffi_response_to_core(resp))
            .and_then(|parsed| parsed.pretty())
        {
            Ok(pretty) => FfiLoklakResult::ok_json(status, pretty),
            Err(e) => FfiLoklakResult::from_error(status, e),
        }
    })
    .unwrap_or_else(|_| FfiLoklakResult::panic("panic in loklak_parse_response"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `loklak_build_*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn loklak_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free a result returned by `loklak_parse_response`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn loklak_free_result(result: *mut FfiLoklakResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.json.is_null() {
            drop(unsafe { CString::from_raw(result.json) });
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn loklak_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
