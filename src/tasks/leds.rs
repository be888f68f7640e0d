use defmt::{debug, info};
use embassy_futures::select::{Either, select};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver, Sender},
};
use embassy_time::{Duration, Ticker};
use heapless::spsc::Queue;
use smart_leds::RGB8;

use crate::animations::{Animation, WipeAnimation, next_buffer, weight_rainbow};
use crate::drivers::neopixel::{LedBuffer, LedDriver};
use crate::{LED_BRIGHTNESS, MAX_PENDING_ANIMATIONS, WIPE_STEP};

/// Drive the LED strip by sending the LED task messages of this type
pub enum LedCommand {
    /// Queue a colour wipe across the strip
    Wipe(RGB8),
    /// Fill the whole strip with one colour immediately
    Fill(RGB8),
    /// Render the weight rainbow for a reading in deci-grams
    Weight(i32),
    /// All LEDs off, dropping anything still queued
    Off,
}

const LED_QUEUE_SIZE: usize = 10;
/// Channel types for the LED task.
pub type LedChannel = Channel<CriticalSectionRawMutex, LedCommand, LED_QUEUE_SIZE>;
pub type LedChannelSender = Sender<'static, CriticalSectionRawMutex, LedCommand, LED_QUEUE_SIZE>;
pub type LedChannelReceiver =
    Receiver<'static, CriticalSectionRawMutex, LedCommand, LED_QUEUE_SIZE>;

/// LED strip main task.
/// The strip is fully managed from this task: wipes step on a ticker and
/// run to completion in arrival order, direct frames (fills, weight
/// rainbows) pre-empt whatever wipe is in flight.
///
/// # Parameters
/// * `channel` - Channel receiver for LED commands
/// * `led` - LED driver instance for the strip
#[embassy_executor::task]
pub async fn led_task(channel: &'static LedChannelReceiver, led: &'static mut LedDriver) {
    let mut ticker = Ticker::every(Duration::from_millis(WIPE_STEP));
    let mut pending: Queue<Animation, MAX_PENDING_ANIMATIONS> = Queue::new();
    let mut current: Option<Animation> = None;

    info!("LED_TASK: Task started. Waiting for commands...");
    loop {
        match select(ticker.next(), channel.receive()).await {
            // Animation step timer
            Either::First(_) => {
                let mut frame = current.as_mut().and_then(next_buffer);
                if frame.is_none() {
                    // The current wipe (if any) has finished painting;
                    // promote the next one waiting in the queue. A finished
                    // wipe with nothing queued holds its final frame.
                    current = pending.dequeue();
                    if let Some(ref anim) = current {
                        debug!("LED_TASK: Starting {}", anim);
                    }
                    frame = current.as_mut().and_then(next_buffer);
                }
                if let Some(ref mut buffer) = frame {
                    led.update_from_buffer(buffer, LED_BRIGHTNESS).await;
                }
            }
            // Control message from our channel
            Either::Second(command) => match command {
                LedCommand::Wipe(colour) => {
                    if pending
                        .enqueue(Animation::Wipe(WipeAnimation::new(colour)))
                        .is_err()
                    {
                        debug!("LED_TASK: Animation queue full, wipe dropped");
                    }
                }
                LedCommand::Fill(colour) => {
                    current = None;
                    led.fill(colour, LED_BRIGHTNESS).await;
                }
                LedCommand::Weight(weight_dg) => {
                    current = None;
                    let mut buffer: LedBuffer = weight_rainbow(weight_dg);
                    led.update_from_buffer(&mut buffer, LED_BRIGHTNESS).await;
                }
                LedCommand::Off => {
                    current = None;
                    while pending.dequeue().is_some() {}
                    led.all_off().await;
                }
            },
        }
    }
}
