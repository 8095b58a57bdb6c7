pub mod widget_poller;
