#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Threads {
    Single,
    #[default]
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

/// What to do when a location cannot be reached from another one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnreachablePolicy {
    /// Abort the matrix build with `MatrixError::NoPath`.
    #[default]
    Fail,
    /// Store `+inf`, the pair is then never used by a tour.
    Forbid,
}

#[derive(Clone, Debug, Default)]
pub struct MatrixParams {
    pub threads: Threads,
    pub unreachable: UnreachablePolicy,
}
