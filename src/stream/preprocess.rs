//! Stream combinator running packets through a preprocessor

use futures::{Stream, ready};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::{Clock, EventSink, PacketPreprocessor, TmPacket};

/// Extension trait to preprocess any stream of packets
pub trait PreprocessExt: Stream<Item = TmPacket> {
    /// Stamp every packet and yield only the accepted ones.
    ///
    /// Dropped packets are skipped; their diagnostics still reach the
    /// preprocessor's sink.
    fn preprocess<S, C>(self, preprocessor: PacketPreprocessor<S, C>) -> Preprocess<Self, S, C>
    where
        Self: Sized,
        S: EventSink,
        C: Clock,
    {
        Preprocess::new(self, preprocessor)
    }
}

impl<T: Stream<Item = TmPacket>> PreprocessExt for T {}

pin_project! {
    /// A stream combinator that stamps packets and filters out dropped ones
    pub struct Preprocess<St, S, C> {
        #[pin]
        stream: St,
        preprocessor: PacketPreprocessor<S, C>,
    }
}

impl<St, S, C> Preprocess<St, S, C> {
    pub fn new(stream: St, preprocessor: PacketPreprocessor<S, C>) -> Self {
        Self { stream, preprocessor }
    }

    pub fn preprocessor(&self) -> &PacketPreprocessor<S, C> {
        &self.preprocessor
    }

    /// Stop preprocessing, returning the inner stream and the preprocessor state.
    pub fn into_parts(self) -> (St, PacketPreprocessor<S, C>) {
        (self.stream, self.preprocessor)
    }
}

impl<St, S, C> Stream for Preprocess<St, S, C>
where
    St: Stream<Item = TmPacket>,
    S: EventSink,
    C: Clock,
{
    type Item = TmPacket;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            match ready!(this.stream.as_mut().poll_next(cx)) {
                Some(mut packet) => {
                    if this.preprocessor.process(&mut packet).is_accept() {
                        return Poll::Ready(Some(packet));
                    }
                    // Dropped, keep pulling
                }
                None => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Any number of packets may be dropped.
        (0, self.stream.size_hint().1)
    }
}
