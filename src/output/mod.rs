pub mod formatter;

pub use formatter::{
    format_breakdown, format_course_list, format_grades, format_json, format_points,
    format_result, format_scheme_list, should_use_colors,
};
