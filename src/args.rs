/// Command line arguments that select what to read, how to sort it, and where to write it
#[derive(Debug, Clone, Default)]
pub struct SortArgs {
    pub files: Vec<String>,
    pub output: Option<String>,
    pub numeric_sort: bool,
    pub check: bool,
    pub zero_terminated: bool,
}

impl SortArgs {
    /// Line delimiter byte
    pub fn delimiter(&self) -> u8 {
        if self.zero_terminated {
            b'\0'
        } else {
            b'\n'
        }
    }
}
