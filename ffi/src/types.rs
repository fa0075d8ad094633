//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion helpers live here so that
//! `lib.rs` stays focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use loklak_core::{ApiError, HttpMethod, HttpRequest, LoklakClient, QueryOptions};

/// Opaque handle to a `LoklakClient`.
pub struct FfiLoklakClient {
    pub(crate) inner: LoklakClient,
}

/// Opaque handle to a `QueryOptions` being filled in by the caller.
pub struct FfiQueryOptions {
    pub(crate) inner: QueryOptions,
}

/// Copy `s` into a heap-allocated C string. Interior NUL bytes are dropped.
pub(crate) fn to_c_string(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A form field supplied by the caller to `loklak_build_call`.
/// Neither string is freed by the library.
#[repr(C)]
pub struct FfiFormField {
    pub key: *const c_char,
    pub value: *const c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// `url` is absolute and already carries the query string. `body` is null
/// for GET requests.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let url = to_c_string(req.url);
        let body = match req.body {
            Some(b) => to_c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The caller fills this in after executing the request and passes a
/// pointer to `loklak_parse_response`. The library reads but does not free
/// these fields.
///
/// `body` points to `body_len` bytes and need not be NUL-terminated; NUL
/// bytes inside the body are read like any other byte. A null `body` is
/// treated as an empty body regardless of `body_len`.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const u8,
    pub body_len: usize,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiLoklakResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Connection = 1,
    Decode = 2,
    Config = 3,
    Panic = 4,
    NullArg = 5,
}

/// Result envelope for `loklak_parse_response`.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `json`
/// holds the pretty-printed body. On failure `json` is null and
/// `error_message` describes the problem. `http_status` is always the
/// status the caller passed in, or 0 when no response was read.
#[repr(C)]
pub struct FfiLoklakResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub json: *mut c_char,
}

impl FfiLoklakResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        json: *mut c_char,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiLoklakResult {
            error_code,
            error_message,
            http_status,
            json,
        }))
    }

    pub(crate) fn ok_json(status: u16, pretty: String) -> *mut Self {
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), status, to_c_string(pretty))
    }

    pub(crate) fn from_error(status: u16, err: ApiError) -> *mut Self {
        let code = match &err {
            ApiError::Connection(_) => FfiErrorCode::Connection,
            ApiError::Decode(_) => FfiErrorCode::Decode,
            ApiError::Config(_) => FfiErrorCode::Config,
        };
        Self::boxed(code, to_c_string(err.to_string()), status, std::ptr::null_mut())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::NullArg,
            to_c_string(format!("null argument: {name}")),
            0,
            std::ptr::null_mut(),
        )
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::Panic,
            to_c_string(msg.to_string()),
            0,
            std::ptr::null_mut(),
        )
    }
}
