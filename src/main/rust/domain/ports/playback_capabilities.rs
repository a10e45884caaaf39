/// Port for runtime media feature detection
///
/// Queried every time a strategy is selected; implementations must not assume
/// the answer is fixed for the process lifetime.
pub trait PlaybackCapabilities: Send + Sync {
    /// An adaptive-streaming engine can load HLS playlists itself
    fn supports_adaptive_engine(&self) -> bool;

    /// The plain media element can play HLS playlists natively
    fn supports_native_playlist(&self) -> bool;
}
