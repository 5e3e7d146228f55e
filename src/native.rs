//! The error convention of the native boundary.
//!
//! Every native symbol returns an `af_err`; zero is success and anything else is turned into an
//! [`ArrayError::Native`] carrying the native library's last error string.

use std::any::Any;
use std::ffi::CStr;
use std::os::raw::{c_char, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::sync::Once;

use arrayfire as af;
use log::debug;

use super::ffi::{self, af_err, dim_t, AF_SUCCESS};
use super::{ArrayError, Result};

/// Call a raw native symbol and check its return code, naming the symbol on failure.
macro_rules! af_call {
    ($f:ident($($arg:expr),* $(,)?)) => {
        $crate::native::check(stringify!($f), unsafe { $crate::ffi::$f($($arg),*) })
    };
}

pub(crate) use af_call;

/// Convert a native return code into a `Result`.
pub(crate) fn check(op: &'static str, code: af_err) -> Result<()> {
    if code == AF_SUCCESS {
        Ok(())
    } else {
        let message = last_error(code);
        debug!("{} failed with code {}: {}", op, code, message);
        Err(ArrayError::Native { op, code, message })
    }
}

fn last_error(code: af_err) -> String {
    let mut msg: *mut c_char = ptr::null_mut();
    let mut len: dim_t = 0;

    let message = unsafe {
        ffi::af_get_last_error(&mut msg, &mut len);

        if msg.is_null() {
            String::new()
        } else {
            let message = CStr::from_ptr(msg).to_string_lossy().into_owned();
            ffi::af_free_host(msg as *mut c_void);
            message
        }
    };

    if message.is_empty() {
        let description = unsafe { ffi::af_err_to_string(code) };
        if description.is_null() {
            format!("error code {}", code)
        } else {
            unsafe { CStr::from_ptr(description) }
                .to_string_lossy()
                .into_owned()
        }
    } else {
        message
    }
}

/// Take ownership of a string allocated by the native library.
pub(crate) fn take_host_string(raw: *mut c_char) -> String {
    if raw.is_null() {
        return String::new();
    }

    unsafe {
        let string = CStr::from_ptr(raw).to_string_lossy().into_owned();
        ffi::af_free_host(raw as *mut c_void);
        string
    }
}

struct NativeFailure(af::AfError);

fn raise(err: af::AfError) {
    if !matches!(err, af::AfError::SUCCESS) {
        panic::resume_unwind(Box::new(NativeFailure(err)));
    }
}

static HANDLER: Once = Once::new();

/// Call a function of the `arrayfire` crate, converting a failure reported through its error
/// callback into an [`ArrayError::Native`].
pub(crate) fn guarded<T, F: FnOnce() -> T>(op: &'static str, f: F) -> Result<T> {
    HANDLER.call_once(|| af::register_error_handler(af::Callback::new(raise)));

    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| failure(op, payload))
}

fn failure(op: &'static str, payload: Box<dyn Any + Send>) -> ArrayError {
    let (code, message) = match payload.downcast::<NativeFailure>() {
        Ok(failure) => (failure.0 as i32, failure.0.to_string()),
        Err(payload) => match payload.downcast::<String>() {
            Ok(message) => (-1, *message),
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (-1, message.to_string()),
                Err(_) => (-1, "unknown failure".to_string()),
            },
        },
    };

    debug!("{} failed with code {}: {}", op, code, message);
    ArrayError::Native { op, code, message }
}
