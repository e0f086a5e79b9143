#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const TIMETABLER_ASSERT_LEVEL_DEFINITION: u8 = TIMETABLER_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const TIMETABLER_ASSERT_LEVEL_DEFINITION: u8 = TIMETABLER_ASSERT_EXTREME;

pub const TIMETABLER_ASSERT_SIMPLE: u8 = 1;
pub const TIMETABLER_ASSERT_MODERATE: u8 = 2;
pub const TIMETABLER_ASSERT_EXTREME: u8 = 4;

#[macro_export]
#[doc(hidden)]
macro_rules! timetabler_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::TIMETABLER_ASSERT_LEVEL_DEFINITION >= $crate::asserts::TIMETABLER_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! timetabler_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::TIMETABLER_ASSERT_LEVEL_DEFINITION >= $crate::asserts::TIMETABLER_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}
