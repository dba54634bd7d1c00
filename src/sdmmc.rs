//! [`Storage`] on a FAT-formatted SD card through `embedded-sdmmc`.
//!
//! Files live in the root directory of one volume and must use 8.3 names.
//! Every call opens the volume, the root directory and the file, and closes
//! them again before returning.

use embedded_sdmmc::{BlockDevice, Mode, TimeSource, VolumeIdx, VolumeManager};

use crate::storage::Storage;

pub struct SdmmcStorage<D, T, const DIRS: usize = 4, const FILES: usize = 4, const VOLS: usize = 1>
where
    D: BlockDevice,
    T: TimeSource,
{
    volume_mgr: VolumeManager<D, T, DIRS, FILES, VOLS>,
    volume: usize,
}

impl<D, T, const DIRS: usize, const FILES: usize, const VOLS: usize> SdmmcStorage<D, T, DIRS, FILES, VOLS>
where
    D: BlockDevice,
    T: TimeSource,
{
    /// Use the first partition of the card.
    pub fn new(volume_mgr: VolumeManager<D, T, DIRS, FILES, VOLS>) -> Self {
        Self::on_volume(volume_mgr, 0)
    }

    pub fn on_volume(volume_mgr: VolumeManager<D, T, DIRS, FILES, VOLS>, volume: usize) -> Self {
        Self { volume_mgr, volume }
    }

    pub fn release(self) -> VolumeManager<D, T, DIRS, FILES, VOLS> {
        self.volume_mgr
    }

    fn write_file(
        &mut self,
        name: &str,
        mode: Mode,
        contents: &[u8],
    ) -> Result<(), embedded_sdmmc::Error<D::Error>> {
        let volume = self.volume_mgr.open_volume(VolumeIdx(self.volume))?;
        let root_dir = volume.open_root_dir()?;
        let file = root_dir.open_file_in_dir(name, mode)?;
        file.write(contents)?;
        file.close()
    }
}

impl<D, T, const DIRS: usize, const FILES: usize, const VOLS: usize> Storage
    for SdmmcStorage<D, T, DIRS, FILES, VOLS>
where
    D: BlockDevice,
    T: TimeSource,
{
    type Error = embedded_sdmmc::Error<D::Error>;

    fn exists(&mut self, name: &str) -> Result<bool, Self::Error> {
        let volume = self.volume_mgr.open_volume(VolumeIdx(self.volume))?;
        let root_dir = volume.open_root_dir()?;
        match root_dir.find_directory_entry(name) {
            Ok(_) => Ok(true),
            Err(embedded_sdmmc::Error::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn create(&mut self, name: &str, contents: &[u8]) -> Result<(), Self::Error> {
        self.write_file(name, Mode::ReadWriteCreateOrTruncate, contents)
    }

    fn append(&mut self, name: &str, contents: &[u8]) -> Result<(), Self::Error> {
        self.write_file(name, Mode::ReadWriteAppend, contents)
    }
}
