// Components module - building blocks of the presenter screen
//
// - Title bar: deck title and current slide
// - Slide view: transition layers
// - Contact form: inputs, errors, Send button
// - Nav bar: Prev/Next buttons and progress gauge
// - Toast: transient notifications

pub mod contact_form;
pub mod nav_bar;
pub mod slide_view;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
