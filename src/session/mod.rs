pub(crate) mod animation;
pub(crate) mod render_session;
