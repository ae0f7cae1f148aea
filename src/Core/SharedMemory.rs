// Shared memory backend abstraction for Linux
// Uses System V segments (shmget + shmat) so unrelated processes can meet on a fixed key

use std::fmt::Debug;
use std::io;
use std::ptr::NonNull;

/// Shared memory backend trait for cross-process memory mapping
pub trait SharedMemoryBackend: Send + Sync + Debug {
    /// Get a pointer to the attached memory region
    fn as_ptr(&self) -> *mut u8;

    /// Get the size of the attached region in bytes
    fn size(&self) -> usize;

    /// Get the underlying segment identifier
    fn raw_handle(&self) -> RawHandle;
}

/// Platform-specific handle type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawHandle {
    /// System V shared memory identifier (as returned by `shmget`)
    ShmId(i32),
}

/// Attach to the segment stored under `key`, creating it if it does not exist yet.
///
/// Creation is idempotent: concurrent callers using the same key all end up
/// attached to the same segment. A freshly created segment is zero-filled.
///
/// # Arguments
/// * `key` - Well-known System V IPC key shared by all cooperating processes
/// * `size` - Size of the segment in bytes
///
/// # Returns
/// A boxed trait object implementing SharedMemoryBackend
#[cfg(target_os = "linux")]
pub fn create_shared_memory(key: i32, size: usize) -> io::Result<Box<dyn SharedMemoryBackend>> {
    Ok(Box::new(SysVSharedMemory::open(key, size, libc::IPC_CREAT | 0o660)?))
}

/// Attach to an existing segment without creating it.
///
/// Fails with `ErrorKind::NotFound` when no segment is stored under `key`.
#[cfg(target_os = "linux")]
pub fn attach_shared_memory(key: i32, size: usize) -> io::Result<Box<dyn SharedMemoryBackend>> {
    Ok(Box::new(SysVSharedMemory::open(key, size, 0o660)?))
}

/// Mark a segment for removal.
///
/// On Linux the key is released immediately, so the next `create_shared_memory`
/// with the same key starts over from a zeroed segment. Processes still attached
/// keep their mapping until they detach.
#[cfg(target_os = "linux")]
pub fn remove_shared_memory(handle: RawHandle) -> io::Result<()> {
    let RawHandle::ShmId(id) = handle;
    let rc = unsafe { libc::shmctl(id, libc::IPC_RMID, std::ptr::null_mut()) };
    if rc == -1 {
        let err = io::Error::last_os_error();
        // Someone else removed it first
        if err.raw_os_error() == Some(libc::EINVAL) || err.raw_os_error() == Some(libc::EIDRM) {
            return Ok(());
        }
        return Err(io::Error::new(
            err.kind(),
            format!("Failed to remove shared memory segment {}: {}", id, err),
        ));
    }
    Ok(())
}

/// Check whether a segment is currently stored under `key`.
#[cfg(target_os = "linux")]
pub fn shared_memory_exists(key: i32) -> bool {
    unsafe { libc::shmget(key, 0, 0) != -1 }
}

#[cfg(not(target_os = "linux"))]
pub fn create_shared_memory(_key: i32, _size: usize) -> io::Result<Box<dyn SharedMemoryBackend>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "Shared memory only supported on Linux",
    ))
}

#[cfg(not(target_os = "linux"))]
pub fn attach_shared_memory(_key: i32, _size: usize) -> io::Result<Box<dyn SharedMemoryBackend>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "Shared memory only supported on Linux",
    ))
}

#[cfg(not(target_os = "linux"))]
pub fn remove_shared_memory(_handle: RawHandle) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "Shared memory only supported on Linux",
    ))
}

#[cfg(not(target_os = "linux"))]
pub fn shared_memory_exists(_key: i32) -> bool {
    false
}

#[cfg(target_os = "linux")]
#[derive(Debug)]
pub struct SysVSharedMemory {
    ptr: NonNull<u8>,
    size: usize,
    id: i32,
}

#[cfg(target_os = "linux")]
unsafe impl Send for SysVSharedMemory {}
#[cfg(target_os = "linux")]
unsafe impl Sync for SysVSharedMemory {}

#[cfg(target_os = "linux")]
impl SysVSharedMemory {
    fn open(key: i32, size: usize, flags: i32) -> io::Result<Self> {
        if size == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Shared memory segment size must be greater than zero",
            ));
        }

        let id = unsafe { libc::shmget(key, size, flags) };
        if id == -1 {
            let err = io::Error::last_os_error();
            return Err(io::Error::new(
                err.kind(),
                format!(
                    "shmget failed for key {:#x} ({} bytes): {}",
                    key, size, err
                ),
            ));
        }

        let ptr = unsafe { libc::shmat(id, std::ptr::null(), 0) };
        if ptr as isize == -1 {
            let err = io::Error::last_os_error();
            return Err(io::Error::new(
                err.kind(),
                format!("shmat failed for segment {}: {}", id, err),
            ));
        }

        let ptr = NonNull::new(ptr as *mut u8).ok_or_else(|| {
            io::Error::new(io::ErrorKind::Other, "shmat returned a null mapping")
        })?;

        Ok(Self { ptr, size, id })
    }
}

#[cfg(target_os = "linux")]
impl Drop for SysVSharedMemory {
    fn drop(&mut self) {
        unsafe {
            libc::shmdt(self.ptr.as_ptr() as *const libc::c_void);
        }
    }
}

#[cfg(target_os = "linux")]
impl SharedMemoryBackend for SysVSharedMemory {
    fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    fn size(&self) -> usize {
        self.size
    }

    fn raw_handle(&self) -> RawHandle {
        RawHandle::ShmId(self.id)
    }
}
