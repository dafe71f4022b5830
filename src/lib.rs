/*!

A CHIP-8 emulator as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use terminal frontend
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The keys `1234`, `qwer`, `asdf` and `zxcv` make up the hex keypad, Esc quits.
Use `--rate` to change how many instructions are executed per second (500 by default).

# Library

If you are not interested in handling input and output,
then you can use `Emulator::new()` to get an emulator with a headless backend.

The main way of running a program is to load instructions as bytes.

```rust
use chip8_emu::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load_rom_bytes(&clear_display).unwrap();
emulator.step(); // Will now clear the display
assert_eq!(emulator.cpu().program_counter(), 0x202);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_emu::emulator::Emulator;
use chip8_emu::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen);

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]);
assert_eq!(emulator.cpu().registers()[0xB], 35);
```

## Custom backends

To get keypresses and show frames, implement `EmulatorInput`, `EmulatorOutput` and `Backend`,
which represent somewhere to get keyboard input from, a screen with a speaker,
and the lifecycle around them respectively.
Take a look at `src/emulator/backend.rs` to see how the headless backend does it, then do the following.

```ignore
use chip8_emu::emulator::{Config, Emulator};

let mut emulator = Emulator::with_backend(MyBackend::new(), Config::default());
emulator.load_rom("game.ch8")?;
emulator.start()?; // Runs until the backend asks to quit
```

You can then run the emulator using your own custom frontend, as done with crossterm in crossterm_frontend.
*/

pub mod emulator;
