//! Profile and macro access

/// Errors reported by collaborator services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceError {
    /// Index or name does not exist
    NotFound,
}

/// Read access to profiles plus the active mode (M1-M3)
pub trait ProfileSource {
    /// Number of known profiles
    fn profile_count(&self) -> usize;

    /// Name of the profile at `index`
    fn profile_name(&self, index: usize) -> Option<&str>;

    /// Index of the loaded profile
    fn active_profile(&self) -> Option<usize>;

    /// Make the profile at `index` active
    fn load_profile(&mut self, index: usize) -> Result<(), ServiceError>;

    /// Active mode (1-3)
    fn mode(&self) -> u8;

    /// Switch mode (1-3)
    fn set_mode(&mut self, mode: u8);

    /// Name of the active profile
    fn active_profile_name(&self) -> Option<&str> {
        self.active_profile().and_then(|index| self.profile_name(index))
    }
}

/// Read access to recorded macros
pub trait MacroSource {
    fn macro_count(&self) -> usize;

    fn macro_name(&self, index: usize) -> Option<&str>;
}
