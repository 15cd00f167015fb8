use std::time::Duration;
use tokio::sync::mpsc;

/// Sisi input debouncer. Setiap `push` membatalkan timer yang masih menunggu.
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T> Clone for Debouncer<T> {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
        }
    }
}

impl<T: Send + 'static> Debouncer<T> {
    /// Mulai stage debounce. Receiver hanya menerima nilai terakhir setelah
    /// input diam selama `window`. Menutup semua `Debouncer` membuang nilai
    /// yang belum sempat keluar.
    pub fn spawn(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, mut input_rx) = mpsc::unbounded_channel::<T>();
        let (output, output_rx) = mpsc::unbounded_channel::<T>();

        tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                match pending.take() {
                    Some(value) => {
                        tokio::select! {
                            next = input_rx.recv() => match next {
                                Some(next) => pending = Some(next),
                                None => break,
                            },
                            _ = tokio::time::sleep(window) => {
                                if output.send(value).is_err() {
                                    break;
                                }
                            }
                        }
                    }
                    None => match input_rx.recv().await {
                        Some(next) => pending = Some(next),
                        None => break,
                    },
                }
            }
        });

        (Self { input }, output_rx)
    }

    /// Kirim input mentah (mis. tiap ketikan di kolom cari).
    pub fn push(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }
}
