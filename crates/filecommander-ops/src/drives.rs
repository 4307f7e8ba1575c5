//! Drive and volume enumeration.

use sysinfo::Disks;
use tracing::trace;

/// Filesystems that are network, optical, RAM-backed or virtual.
const EXCLUDED_FILESYSTEMS: &[&str] = &[
    // network
    "nfs", "nfs4", "cifs", "smb", "smbfs", "smb2", "smb3", "afpfs", "webdav", "davfs",
    "fuse.sshfs", "9p", "ncpfs", "afs",
    // optical
    "iso9660", "udf", "cd9660", "cdfs",
    // memory
    "tmpfs", "ramfs", "devtmpfs",
    // virtual
    "proc", "sysfs", "devfs", "overlay", "squashfs", "autofs",
];

/// Whether a filesystem name denotes fixed or removable local media.
pub fn is_local_media(file_system: &str) -> bool {
    let fs = file_system.trim().to_lowercase();
    !fs.is_empty() && !EXCLUDED_FILESYSTEMS.contains(&fs.as_str())
}

/// Root paths of fixed and removable volumes, sorted and deduplicated.
pub fn list_drives() -> Vec<String> {
    let disks = Disks::new_with_refreshed_list();

    let mut roots: Vec<String> = disks
        .list()
        .iter()
        .filter(|disk| {
            let file_system = disk.file_system().to_string_lossy();
            let keep = is_local_media(&file_system);
            trace!(
                mount = %disk.mount_point().display(),
                %file_system,
                removable = disk.is_removable(),
                keep,
                "disk"
            );
            keep
        })
        .map(|disk| disk.mount_point().to_string_lossy().into_owned())
        .collect();

    roots.sort();
    roots.dedup();
    roots
}
