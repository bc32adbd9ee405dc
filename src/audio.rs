use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

// Background music loop. Every failure path reports once and returns
// None so the show simply runs silent.

pub struct Music {
    _stream: OutputStream,
    _sink: Sink,
}

pub fn start(path: &Path) -> Option<Music> {
    let stream = match OutputStreamBuilder::open_default_stream() {
        Ok(stream) => stream,
        Err(err) => {
            eprintln!("audio: no output device: {err}");
            return None;
        }
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("audio: cannot open {}: {err}", path.display());
            return None;
        }
    };

    let source = match Decoder::new(BufReader::new(file)) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("audio: cannot decode {}: {err}", path.display());
            return None;
        }
    };

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(1.0);
    sink.append(source.repeat_infinite());

    Some(Music {
        _stream: stream,
        _sink: sink,
    })
}
