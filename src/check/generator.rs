use rand::{Rng, rngs::StdRng};

/// A source of pseudo-random `T` values drawn from a shared rng
pub struct Generator<T> {
    draw: Box<dyn Fn(&mut StdRng) -> T>,
}

impl<T: 'static> Generator<T> {
    pub fn new(draw: impl Fn(&mut StdRng) -> T + 'static) -> Self {
        Self {
            draw: Box::new(draw),
        }
    }

    pub fn generate(&self, rng: &mut StdRng) -> T {
        (self.draw)(rng)
    }

    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Generator<U> {
        Generator::new(move |rng| f(self.generate(rng)))
    }
}

/// Integers in `min..=max`
pub fn integer(min: i32, max: i32) -> Generator<i32> {
    assert!(min <= max, "empty integer range {min}..={max}");
    Generator::new(move |rng| rng.gen_range(min..=max))
}

/// Naturals in `0..=max`
pub fn nat(max: u32) -> Generator<u32> {
    Generator::new(move |rng| rng.gen_range(0..=max))
}

pub fn boolean() -> Generator<bool> {
    Generator::new(|rng| rng.gen_bool(0.5))
}

/// One of `values`, uniformly
pub fn constant_from<T: Clone + 'static>(values: Vec<T>) -> Generator<T> {
    assert!(!values.is_empty(), "constant_from needs at least one value");
    Generator::new(move |rng| values[rng.gen_range(0..values.len())].clone())
}

/// Vectors whose length is uniform in `min_len..=max_len`
pub fn array<T: 'static>(element: Generator<T>, min_len: usize, max_len: usize) -> Generator<Vec<T>> {
    assert!(min_len <= max_len, "empty length range {min_len}..={max_len}");
    Generator::new(move |rng| {
        let len = rng.gen_range(min_len..=max_len);
        (0..len).map(|_| element.generate(rng)).collect()
    })
}

pub fn tuple2<A: 'static, B: 'static>(a: Generator<A>, b: Generator<B>) -> Generator<(A, B)> {
    Generator::new(move |rng| {
        let first = a.generate(rng);
        (first, b.generate(rng))
    })
}

pub fn tuple3<A: 'static, B: 'static, C: 'static>(
    a: Generator<A>,
    b: Generator<B>,
    c: Generator<C>,
) -> Generator<(A, B, C)> {
    Generator::new(move |rng| {
        let first = a.generate(rng);
        let second = b.generate(rng);
        (first, second, c.generate(rng))
    })
}

/// Build a struct from two field generators
pub fn record<A: 'static, B: 'static, T: 'static>(
    a: Generator<A>,
    b: Generator<B>,
    build: impl Fn(A, B) -> T + 'static,
) -> Generator<T> {
    tuple2(a, b).map(move |(first, second)| build(first, second))
}
