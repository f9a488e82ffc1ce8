//! A minimal producer: publishes the current time twice a minute.

use std::{thread, time::Duration};

use barpipe_producer::{palette, registration::Registration};
use barpipe_shared_util::{paths::BarpipePaths, Block, ServiceId};
use chrono::Local;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let paths = BarpipePaths::default();
    let registration = Registration::register(&paths, ServiceId::with_priority(30, "clock"))?;

    loop {
        let now = Local::now().format("%a %b %d %H:%M");
        let block = Block {
            color: Some(palette::color::BLUE.to_string()),
            ..Block::text(format!("{} {}", palette::icon::CLOCK, now))
        };
        registration.publish_one(&block)?;
        thread::sleep(Duration::from_secs(30));
    }
}
