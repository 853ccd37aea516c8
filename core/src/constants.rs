/// Default chunk size fed to each worker when the caller does not override
/// the profile.
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024 * 1024; // 4 MiB
