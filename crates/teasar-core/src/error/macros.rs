//! Error macros for teasar

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::TeasarError::invalid_value($context, $value))
    };
}

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::TeasarError::UsageError($msg.to_string()))
    };
}

/// Macro for rejecting an array whose length differs from the vertex count
#[macro_export]
macro_rules! ensure_len {
    ($what:expr, $slice:expr, $expected:expr) => {
        if $slice.len() != $expected {
            return Err($crate::error::TeasarError::shape_mismatch(
                $what,
                $expected,
                $slice.len(),
            ));
        }
    };
}

/// Macro for rejecting a vertex index outside the graph
#[macro_export]
macro_rules! ensure_vertex {
    ($context:expr, $index:expr, $len:expr) => {
        if $index >= $len {
            return Err($crate::error::TeasarError::vertex_out_of_range(
                $context, $index, $len,
            ));
        }
    };
}
