use std::path::PathBuf;
use std::time::Instant;

use mms_speak::Speaker;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let speaker = Speaker::new();

    let text = "Hello! This is the Massively Multilingual Speech project, \
                serving one voice per language across sixty languages.";

    let synth_start = Instant::now();
    let result = speaker.speak_with_lang("en", text, 1.0)?;
    let synth_dur = synth_start.elapsed();

    let speedup = result.duration_secs() / synth_dur.as_secs_f64();
    println!(
        "Synthesized {:.2}s audio in {:.2?} ({:.1}x real-time)",
        result.duration_secs(),
        synth_dur,
        speedup
    );

    result.write_wav(&PathBuf::from("output.wav"))?;
    println!("Saved to output.wav");

    // Auto-detected language, faster playback.
    let detected = speaker.speak("Bonjour tout le monde, comment allez-vous ?", 1.5)?;
    detected.write_wav(&PathBuf::from("bonjour.wav"))?;
    println!("Saved to bonjour.wav ({:.2}s)", detected.duration_secs());

    Ok(())
}
