use std::ptr::null_mut;

use libc::{MAP_ANONYMOUS, MAP_FAILED, MAP_POPULATE, MAP_PRIVATE, PROT_READ, PROT_WRITE};

/// Maps anonymous, populated memory and fills it with `fill`.
///
/// # Errors
///
/// Returns the OS error if mmap fails.
pub fn mmap<P>(len: usize, fill: u8) -> std::io::Result<*mut P> {
    let v = unsafe {
        libc::mmap(
            null_mut(),
            len,
            PROT_READ | PROT_WRITE,
            MAP_PRIVATE | MAP_ANONYMOUS | MAP_POPULATE,
            -1,
            0,
        )
    };
    if v == MAP_FAILED {
        return Err(std::io::Error::last_os_error());
    }
    unsafe { libc::memset(v, fill as libc::c_int, len) };
    Ok(v as *mut P)
}

/// Unmap memory
///
/// # Safety
/// * `addr` must be a valid pointer to a memory region previously allocated by `mmap`
/// * `len` must be less than or equal the length as the memory region previously allocated by `mmap`
pub unsafe fn munmap<P>(addr: *mut P, len: usize) {
    let r = unsafe { libc::munmap(addr as *mut libc::c_void, len) };
    if r != 0 {
        log::error!(
            "munmap({:x}, {}): {}",
            addr as usize,
            len,
            std::io::Error::last_os_error()
        );
    }
}
