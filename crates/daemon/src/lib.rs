// Remote transport and the remote-storage view over a session
pub mod remote;
pub mod remote_fs;

// App state (configuration, paths)
pub mod state;

// Re-exports for consumers
pub use remote::{BlobDetails, BlobReader, RemoteClient, RemoteConfig, RemoteError};
pub use remote_fs::{ObjectInfo, RemoteFs, RemoteFsError};
pub use state::{AppConfig, AppState, StateError};

use common::session::Session;

/// Build the remote-storage view described by `config`
pub fn open_remote_fs(config: &AppConfig) -> Result<RemoteFs<RemoteClient>, RemoteError> {
    let client = RemoteClient::new(&RemoteConfig::from(config))?;
    let session = Session::new(client)
        .with_root(&config.root)
        .with_trash(config.inject_trash);
    Ok(RemoteFs::new(session))
}
