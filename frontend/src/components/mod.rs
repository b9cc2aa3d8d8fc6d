pub mod frame_scroll;
