// Shared memory backend tests for Linux
// Run with: cargo test --test shared_memory -- --nocapture

#[cfg(target_os = "linux")]
mod linux_tests {
    use notistack::Core::{
        attach_shared_memory, create_shared_memory, remove_shared_memory, shared_memory_exists,
        RawHandle, SharedMemoryBackend,
    };
    use serial_test::serial;

    // Keys private to this test binary so parallel test binaries never collide
    const KEY_BASE: i32 = 0x4E53_1000;

    fn cleanup(key: i32) {
        if let Ok(shm) = attach_shared_memory(key, 1) {
            remove_shared_memory(shm.raw_handle()).unwrap();
        }
    }

    fn read(shm: &dyn SharedMemoryBackend, index: usize) -> u8 {
        assert!(index < shm.size());
        unsafe { *shm.as_ptr().add(index) }
    }

    fn write(shm: &dyn SharedMemoryBackend, index: usize, value: u8) {
        assert!(index < shm.size());
        unsafe { *shm.as_ptr().add(index) = value }
    }

    #[test]
    #[serial]
    fn test_create_shared_memory() {
        let key = KEY_BASE + 1;
        cleanup(key);

        let shm = create_shared_memory(key, 4096).unwrap();
        assert_eq!(shm.size(), 4096);
        assert!(!shm.as_ptr().is_null());
        assert!(shared_memory_exists(key));

        write(&*shm, 0, 0x42);
        assert_eq!(read(&*shm, 0), 0x42);

        remove_shared_memory(shm.raw_handle()).unwrap();
    }

    #[test]
    #[serial]
    fn test_zero_initialized() {
        let key = KEY_BASE + 2;
        cleanup(key);

        let shm = create_shared_memory(key, 1024).unwrap();
        for i in 0..shm.size() {
            assert_eq!(read(&*shm, i), 0, "fresh segment should be zeroed");
        }

        remove_shared_memory(shm.raw_handle()).unwrap();
    }

    #[test]
    #[serial]
    fn test_second_attachment_sees_writes() {
        let key = KEY_BASE + 3;
        cleanup(key);

        let first = create_shared_memory(key, 64).unwrap();
        let second = create_shared_memory(key, 64).unwrap();
        assert_eq!(first.raw_handle(), second.raw_handle());
        assert_ne!(first.as_ptr(), second.as_ptr(), "each attach maps separately");

        write(&*first, 10, 0xAA);
        assert_eq!(read(&*second, 10), 0xAA);

        let attached = attach_shared_memory(key, 64).unwrap();
        assert_eq!(read(&*attached, 10), 0xAA);

        remove_shared_memory(first.raw_handle()).unwrap();
    }

    #[test]
    #[serial]
    fn test_remove_releases_key() {
        let key = KEY_BASE + 4;
        cleanup(key);

        let shm = create_shared_memory(key, 64).unwrap();
        write(&*shm, 0, 7);
        remove_shared_memory(shm.raw_handle()).unwrap();

        assert!(!shared_memory_exists(key));
        // Still mapped for the process that was attached
        assert_eq!(read(&*shm, 0), 7);

        // Removing twice is not an error
        remove_shared_memory(shm.raw_handle()).unwrap();

        let fresh = create_shared_memory(key, 64).unwrap();
        assert_ne!(fresh.raw_handle(), shm.raw_handle());
        assert_eq!(read(&*fresh, 0), 0);

        remove_shared_memory(fresh.raw_handle()).unwrap();
    }

    #[test]
    #[serial]
    fn test_attach_absent_segment_fails() {
        let key = KEY_BASE + 5;
        cleanup(key);

        let err = attach_shared_memory(key, 64).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert!(!shared_memory_exists(key));
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = create_shared_memory(KEY_BASE + 6, 0).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[test]
    #[serial]
    fn test_raw_handle() {
        let key = KEY_BASE + 7;
        cleanup(key);

        let shm = create_shared_memory(key, 64).unwrap();
        match shm.raw_handle() {
            RawHandle::ShmId(id) => assert!(id >= 0, "segment id should be non-negative"),
        }
        remove_shared_memory(shm.raw_handle()).unwrap();
    }
}

#[cfg(not(target_os = "linux"))]
mod non_linux_tests {
    use notistack::Core::{attach_shared_memory, create_shared_memory};

    #[test]
    fn test_unsupported_platform() {
        let result = create_shared_memory(8432, 8);
        assert!(result.is_err());

        if let Err(err) = result {
            assert_eq!(err.kind(), std::io::ErrorKind::Unsupported);
        }
    }

    #[test]
    fn test_attach_unsupported_platform() {
        let result = attach_shared_memory(8432, 8);
        assert!(result.is_err());

        if let Err(err) = result {
            assert_eq!(err.kind(), std::io::ErrorKind::Unsupported);
        }
    }
}
