mod field;

pub(crate) use field::render_field;
