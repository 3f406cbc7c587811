pub mod canvas_view;
