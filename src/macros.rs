// Forward to `log` and/or `defmt` depending on enabled features. With
// neither enabled the arguments are still borrowed so call sites don't
// trip unused-variable lints.

macro_rules! error {
    ($($e:expr),*) => {
        #[cfg(feature = "log")]
        ::log::error!($($e),*);
        #[cfg(feature = "defmt")]
        ::defmt::error!($($e),*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        {
            let _ = ($(&$e),*);
        }
    }
}

pub(crate) use error;

macro_rules! warning {
    ($($e:expr),*) => {
        #[cfg(feature = "log")]
        ::log::warn!($($e),*);
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($e),*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        {
            let _ = ($(&$e),*);
        }
    }
}

pub(crate) use warning;

macro_rules! info {
    ($($e:expr),*) => {
        #[cfg(feature = "log")]
        ::log::info!($($e),*);
        #[cfg(feature = "defmt")]
        ::defmt::info!($($e),*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        {
            let _ = ($(&$e),*);
        }
    }
}

pub(crate) use info;

macro_rules! debug {
    ($($e:expr),*) => {
        #[cfg(feature = "log")]
        ::log::debug!($($e),*);
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($e),*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        {
            let _ = ($(&$e),*);
        }
    }
}

pub(crate) use debug;

macro_rules! trace {
    ($($e:expr),*) => {
        #[cfg(feature = "log")]
        ::log::trace!($($e),*);
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($e),*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        {
            let _ = ($(&$e),*);
        }
    }
}

pub(crate) use trace;
